//! # Peer Identity Services
//!
//! - [`AddressResolver`]: address literal to dialable endpoint
//! - [`AnnouncementManager`]: transactional regeneration of the node
//!   announcement
//!
//! Both take their collaborators (resolvers, signer, clock) through the
//! ports layer; neither logs or retries on error.

mod announcer;
mod resolver;

pub use announcer::AnnouncementManager;
pub use resolver::AddressResolver;

#[cfg(feature = "runtime")]
pub use resolver::DeadlineError;
