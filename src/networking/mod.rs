//! Move-authority client
//!
//! The [`MoveAuthority`] trait is the seam between the move coordinator and
//! the remote service; [`HttpMoveAuthority`] speaks JSON over HTTP.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{HttpMoveAuthority, MoveAuthority};
pub use error::{AuthorityError, AuthorityResult};
pub use protocol::{GameOutcome, MoveReplyRequest, MoveResponse, SubmitMoveRequest};
