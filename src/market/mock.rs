//! Static display data for the portfolio, messages, dashboard and data room.

pub struct Holding {
    pub name: &'static str,
    pub sector: &'static str,
    pub status: HoldingStatus,
    /// (label, value) pairs shown under the name.
    pub facts: [(&'static str, &'static str); 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldingStatus {
    Active,
    Pending,
}

pub const PORTFOLIO_INVESTED: u64 = 450_000;
pub const PORTFOLIO_VALUE: u64 = 512_000;

pub const HOLDINGS: [Holding; 3] = [
    Holding {
        name: "Urban Eats",
        sector: "Fast Casual Dining Chain",
        status: HoldingStatus::Active,
        facts: [("Equity Owned", "2.5%"), ("Next Dividend", "Jun 15, 2025")],
    },
    Holding {
        name: "TechFlow Solutions",
        sector: "SaaS Enterprise Software",
        status: HoldingStatus::Active,
        facts: [("Invested Amount", "200,000 EGP"), ("Lock-up Period", "18 Months")],
    },
    Holding {
        name: "BioHealth Clinics",
        sector: "Healthcare Network",
        status: HoldingStatus::Pending,
        facts: [("Status", "Pending Deal"), ("Next Step", "Sign term sheet")],
    },
];

pub struct Chat {
    pub name: &'static str,
    pub role: &'static str,
    pub last_msg: &'static str,
    pub time: &'static str,
    pub unread: u8,
    /// (from_me, text, time)
    pub thread: &'static [(bool, &'static str, &'static str)],
}

pub const CHATS: [Chat; 3] = [
    Chat {
        name: "Urban Eats Founder",
        role: "Owner",
        last_msg: "The Q4 report is ready for your review.",
        time: "10:45 AM",
        unread: 2,
        thread: &[
            (
                false,
                "Hi there! The Q4 report is ready for your review. Let me know if you have any questions about the metrics.",
                "10:45 AM",
            ),
            (
                true,
                "Thanks! I'll take a look this afternoon and get back to you.",
                "10:48 AM",
            ),
        ],
    },
    Chat {
        name: "TechFlow Support",
        role: "Admin",
        last_msg: "Your transfer has been confirmed.",
        time: "Yesterday",
        unread: 0,
        thread: &[(false, "Your transfer has been confirmed.", "Yesterday")],
    },
    Chat {
        name: "Investment Manager",
        role: "CHANCE Team",
        last_msg: "Can we schedule a call for the new deal?",
        time: "2 Days ago",
        unread: 0,
        thread: &[(false, "Can we schedule a call for the new deal?", "2 Days ago")],
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageState {
    Done,
    Active,
    Waiting,
}

/// Business dashboard: listing application timeline.
pub const APPLICATION_STAGES: [(&str, &str, StageState); 4] = [
    ("Draft Created", "Dec 10", StageState::Done),
    ("Submitted for Review", "Dec 12", StageState::Done),
    ("ITI Verification", "In Progress", StageState::Active),
    ("Live on Market", "Pending", StageState::Waiting),
];

/// Business dashboard: the owner's own listings (name, status, investor unlocks).
pub const MY_LISTINGS: [(&str, &str, u32); 3] = [
    ("Urban Eats Franchise #1", "Live", 14),
    ("Urban Eats Franchise #2", "Live", 9),
    ("Urban Eats Franchise #3", "In review", 0),
];

/// Detail page data room: (name, type, size).
pub const DOCUMENTS: [(&str, &str, &str); 4] = [
    ("Pitch Deck 2024", "PDF", "2.4 MB"),
    ("Financial Statements", "XLS", "1.1 MB"),
    ("Franchise Agreement", "PDF", "850 KB"),
    ("Commercial Registration", "PDF", "450 KB"),
];

/// Hero banner headline figure, in EGP.
pub const CAPITAL_DEPLOYED: u64 = 145_000_000;

/// Dashboard header and stat tiles.
pub const CURRENT_PLAN: &str = "PREMIUM TIER";
pub const DEALS_CLOSED: u32 = 3;
pub const PENDING_ACTIONS: u32 = 2;
