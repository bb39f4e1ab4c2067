#[derive(Debug, PartialEq, Eq)]
pub struct Dhikr {
    pub label: &'static str,
    pub arabic: &'static str,
    pub meaning: &'static str,
    pub target: u32,
}

pub static DHIKRS: [Dhikr; 5] = [
    Dhikr {
        label: "Subhan Allah",
        arabic: "سُبْحَانَ اللَّهِ",
        meaning: "Gloire à Allah",
        target: 33,
    },
    Dhikr {
        label: "Alhamdulillah",
        arabic: "الحَمْدُ لِلَّهِ",
        meaning: "Louange à Allah",
        target: 33,
    },
    Dhikr {
        label: "Allahu Akbar",
        arabic: "اللَّهُ أَكْبَرُ",
        meaning: "Allah est le plus Grand",
        target: 34,
    },
    Dhikr {
        label: "Astaghfirullah",
        arabic: "أَسْتَغْفِرُ اللَّهَ",
        meaning: "Je demande pardon à Allah",
        target: 100,
    },
    Dhikr {
        label: "La ilaha illallah",
        arabic: "لَا إِلَهَ إِلَّا اللَّهُ",
        meaning: "Pas de divinité sauf Allah",
        target: 100,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub label: &'static str,
    pub count: u32,
}

/// Session counter. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct Tasbih {
    selected: usize,
    pub count: u32,
    pub total: u32,
    pub rounds: Vec<Round>,
}

impl Tasbih {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dhikr(&self) -> &'static Dhikr {
        &DHIKRS[self.selected]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Switch dhikr; the current count starts over.
    pub fn select(&mut self, idx: usize) {
        if idx < DHIKRS.len() {
            self.selected = idx;
            self.count = 0;
        }
    }

    pub fn select_next(&mut self) {
        self.select((self.selected + 1) % DHIKRS.len());
    }

    pub fn select_prev(&mut self) {
        self.select((self.selected + DHIKRS.len() - 1) % DHIKRS.len());
    }

    /// One bead. Returns true when this bead completed a round.
    pub fn count(&mut self) -> bool {
        let dhikr = self.dhikr();
        self.count += 1;
        self.total += 1;
        if self.count >= dhikr.target {
            self.rounds.push(Round {
                label: dhikr.label,
                count: dhikr.target,
            });
            self.count = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.total = 0;
        self.rounds.clear();
    }

    pub fn ring_fraction(&self) -> f64 {
        self.count as f64 / self.dhikr().target as f64
    }
}
