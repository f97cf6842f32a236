use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ticketlog_core::{ActivityShape, PerformerType, Task};

pub const SHIPPING_ADDRESSES: &[&str] = &[
    "N/A",
    "1/22 Constance Street, Fortitude Valley, QLD 4006",
    "6/24-30 Wellington Street, Level 1, Waterloo, NSW 2017",
    "365 Queen Street, Level 3, Melbourne, VIC 3000",
    "19 Smith Street, Darwin, NT 0800",
];
pub const CATEGORIES: &[&str] = &["Phone", "Email", "Enquiry", "Personal"];
pub const ISSUE_TYPES: &[&str] = &[
    "Incident",
    "Fault",
    "Software Installation",
    "Hardware Replacement",
    "Instructional",
    "Other",
];
pub const STATUSES: &[&str] = &[
    "Open",
    "Closed",
    "Resolved",
    "Waiting for Customer",
    "Waiting for Third Party",
    "Pending",
];
pub const GROUPS: &[&str] = &["refund", "repair", "troubleshoot", "installation"];
pub const PRODUCTS: &[&str] = &[
    "mobile",
    "laptop",
    "desktop",
    "tablet",
    "peripheral",
    "audiovisual",
];

pub const PERFORMER_IDS: std::ops::Range<i64> = 100..120;
pub const NOTE_TYPES: std::ops::Range<u8> = 1..5;
pub const SOURCES: std::ops::Range<u8> = 1..9;
pub const PRIORITIES: std::ops::Range<u8> = 1..5;
pub const AGENT_IDS: std::ops::Range<i64> = 145_000..145_010;
pub const REQUESTERS: std::ops::Range<i64> = 268_000..268_050;

/// Bounded random values for every generated attribute.
///
/// Holds nothing but the random source, so a seeded source yields a
/// reproducible sequence of values.
#[derive(Debug, Clone)]
pub struct RandomFieldProvider<R = ChaCha8Rng> {
    rng: R,
}

impl RandomFieldProvider<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl<R: RngCore> RandomFieldProvider<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn shape(&mut self) -> ActivityShape {
        let shapes = ActivityShape::GENERATED;
        shapes[self.rng.random_range(0..shapes.len())]
    }

    pub fn performer_type(&mut self) -> PerformerType {
        let types = PerformerType::ALL;
        types[self.rng.random_range(0..types.len())]
    }

    pub fn performer_id(&mut self) -> i64 {
        self.rng.random_range(PERFORMER_IDS)
    }

    pub fn note_type(&mut self) -> u8 {
        self.rng.random_range(NOTE_TYPES)
    }

    /// Draw every task attribute; `shipment_date` is supplied by the caller.
    pub fn task(&mut self, shipment_date: String) -> Task {
        Task {
            shipping_address: self.pick(SHIPPING_ADDRESSES).to_string(),
            shipment_date: Some(shipment_date),
            category: self.pick(CATEGORIES).to_string(),
            contacted_customer: self.rng.random_bool(0.5),
            issue_type: self.pick(ISSUE_TYPES).to_string(),
            source: self.rng.random_range(SOURCES),
            status: self.pick(STATUSES).to_string(),
            priority: self.rng.random_range(PRIORITIES),
            task_group: self.pick(GROUPS).to_string(),
            agent_id: self.rng.random_range(AGENT_IDS),
            requester: self.rng.random_range(REQUESTERS),
            product: self.pick(PRODUCTS).to_string(),
        }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.random_range(0..options.len())]
    }
}
