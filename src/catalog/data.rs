//! Built-in content: the five merge lines, the level ladder and store prices.

use super::types::{Line, ProgressionRow, Reward, StorePrices, Tier};

fn tier(name: &str, icon: &str, rate: f64, accent: &str) -> Tier {
    Tier {
        name: name.to_string(),
        icon: icon.to_string(),
        rate,
        accent: accent.to_string(),
    }
}

fn line(id: &str, tiers: Vec<Tier>) -> Line {
    Line {
        id: id.to_string(),
        tiers,
    }
}

/// Returns every merge line in the game.
pub fn builtin_lines() -> Vec<Line> {
    vec![
        line(
            "cat_siberian",
            vec![
                tier("Siberian Cat", "🐱", 1.0, "#2563eb"),
                tier("British Shorthair", "🐱", 2.0, "#4f46e5"),
                tier("Maine Coon", "🐱", 4.0, "#f43f5e"),
                tier("Sphynx", "🐱", 8.0, "#fb7185"),
                tier("Snow Leopard", "🐆", 16.0, "#64748b"),
            ],
        ),
        line(
            "dog_husky",
            vec![
                tier("Husky", "🐶", 1.0, "#f97316"),
                tier("Corgi", "🐶", 2.0, "#10b981"),
                tier("Dachshund", "🐶", 4.0, "#6d28d9"),
                tier("Samoyed", "🐶", 8.0, "#6366f1"),
                tier("Labrador", "🐕", 16.0, "#ef4444"),
            ],
        ),
        line(
            "rodent_hamster",
            vec![
                tier("Hamster", "🐹", 2.0, "#22c55e"),
                tier("Guinea Pig", "🐹", 4.0, "#2ec3ff"),
                tier("Chinchilla", "🐭", 8.0, "#64748b"),
                tier("Rabbit", "🐰", 16.0, "#f43f5e"),
                tier("Capybara", "🦫", 32.0, "#ef4444"),
            ],
        ),
        line(
            "wild_fox",
            vec![
                tier("Fox", "🦊", 4.0, "#ff7a18"),
                tier("Fennec", "🦊", 8.0, "#f97316"),
                tier("Raccoon", "🦝", 12.0, "#10b981"),
                tier("Panda", "🐼", 18.0, "#64748b"),
                tier("Koala", "🐨", 28.0, "#16a34a"),
            ],
        ),
        line(
            "weird_axolotl",
            vec![
                tier("Axolotl", "🫧", 6.0, "#fb7185"),
                tier("Octopus", "🐙", 12.0, "#6d28d9"),
                tier("Pufferfish", "🐡", 24.0, "#2ec3ff"),
                tier("Lemur", "🐒", 48.0, "#f97316"),
                tier("Flamingo", "🦩", 96.0, "#db2777"),
            ],
        ),
    ]
}

fn row(level: u32, unlock: &str, rewards: Vec<Reward>) -> ProgressionRow {
    ProgressionRow {
        level,
        unlocks: vec![unlock.to_string()],
        rewards,
    }
}

/// Returns the level ladder, one row per level starting at level 1.
///
/// Past level 5 every row re-announces an existing line; it is already
/// unlocked, so only the rewards matter.
pub fn builtin_progression() -> Vec<ProgressionRow> {
    use Reward::*;

    vec![
        row(1, "cat_siberian", vec![Coins { amount: 10 }]),
        row(
            2,
            "dog_husky",
            vec![Coins { amount: 12 }, PatientPack { count: 1 }],
        ),
        row(
            3,
            "rodent_hamster",
            vec![
                Coins { amount: 14 },
                SpawnBoost {
                    seconds: 60,
                    interval_seconds: 6,
                },
            ],
        ),
        row(4, "wild_fox", vec![Coins { amount: 16 }]),
        row(
            5,
            "weird_axolotl",
            vec![Coins { amount: 18 }, BonusWindow { seconds: 30 }],
        ),
        row(
            6,
            "cat_siberian",
            vec![Coins { amount: 22 }, PatientPack { count: 2 }],
        ),
        row(7, "dog_husky", vec![Coins { amount: 24 }]),
        row(
            8,
            "rodent_hamster",
            vec![Coins { amount: 26 }, BonusWindow { seconds: 45 }],
        ),
        row(
            9,
            "wild_fox",
            vec![
                Coins { amount: 28 },
                SpawnBoost {
                    seconds: 60,
                    interval_seconds: 5,
                },
            ],
        ),
        row(
            10,
            "weird_axolotl",
            vec![Coins { amount: 30 }, PatientPack { count: 2 }],
        ),
        row(11, "cat_siberian", vec![Coins { amount: 34 }]),
        row(
            12,
            "dog_husky",
            vec![Coins { amount: 36 }, BonusWindow { seconds: 60 }],
        ),
        row(13, "rodent_hamster", vec![Coins { amount: 38 }]),
        row(
            14,
            "wild_fox",
            vec![Coins { amount: 40 }, PatientPack { count: 3 }],
        ),
        row(
            15,
            "weird_axolotl",
            vec![
                Coins { amount: 42 },
                SpawnBoost {
                    seconds: 90,
                    interval_seconds: 5,
                },
            ],
        ),
    ]
}

pub fn builtin_store_prices() -> StorePrices {
    StorePrices {
        random_patient: 80,
        patient_pack: 220,
        bonus: 450,
    }
}
