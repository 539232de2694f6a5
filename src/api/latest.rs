//! Last-write-wins bookkeeping for overlapping requests.
//!
//! Each request takes a ticket before it starts. When its response arrives it
//! is applied only if no newer ticket has been issued since, so a slow stale
//! response can never overwrite a newer one.

use std::cell::Cell;
use std::rc::Rc;

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues tickets for one stream of requests. Clones share the counter.
#[derive(Clone, Debug, Default)]
pub struct LatestRequest {
	issued: Rc<Cell<u64>>,
}

impl LatestRequest {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a request, superseding every earlier one.
	pub fn begin(&self) -> Ticket {
		let next = self.issued.get() + 1;
		self.issued.set(next);
		Ticket(next)
	}

	/// True if no request was started after `ticket`.
	pub fn is_current(&self, ticket: Ticket) -> bool {
		self.issued.get() == ticket.0
	}

	/// Supersedes any in-flight request without starting a new one.
	pub fn invalidate(&self) {
		self.begin();
	}
}
