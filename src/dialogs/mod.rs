//! Modal forms.

pub mod invitation;
pub mod site_modal;

pub use invitation::{AdminInvitationDialog, InvitationError, SelectionItem};
pub use site_modal::{DmsCoordinate, SiteDto, SiteModal};
