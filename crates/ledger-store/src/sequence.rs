/// Identifies one issued request. Only the most recently issued ticket may
/// update shared state; older ones belong to superseded requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter shared by loads and recomputes.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: u64,
}

impl RequestSequencer {
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    pub const fn issue(&mut self) -> RequestTicket {
        self.current += 1;
        RequestTicket(self.current)
    }

    pub const fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}
