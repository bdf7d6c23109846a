#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    pub name: &'static str,
    pub mint: &'static str,
    pub website: &'static str,
}

pub const TOKENS: &[TokenConfig] = &[
    TokenConfig {
        name: "mSOL",
        mint: "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So",
        website: "https://marinade.finance",
    },
    TokenConfig {
        name: "JitoSOL",
        mint: "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn",
        website: "https://www.jito.network",
    },
    TokenConfig {
        name: "bSOL",
        mint: "bSo13r4TkiE4KumL71LsHTPpL2euBYLFx6h9HP3piy1",
        website: "https://stake.solblaze.org",
    },
    TokenConfig {
        name: "jupSOL",
        mint: "jupSoLaHXQiZZTSfEWMTRRgpnyFm8f6sZdosWBjx93v",
        website: "https://www.jup.ag",
    },
    TokenConfig {
        name: "dSOL",
        mint: "Dso1bDeDjCQxTrWHqUUi63oBvV7Mdm6WaobLbQ7gnPQ",
        website: "https://www.drift.trade",
    },
];
