//! Endpoint method catalog.
//!
//! Each service method is a thin adapter: it normalizes its named arguments
//! into a parameter mapping and a relative path, then delegates to the
//! generic request pipeline. The only conditional adapter is the status
//! update with media.

pub mod statuses;
pub mod timelines;

pub use statuses::{Media, StatusesService, StatusesServiceTrait, UpdateStatusRequest};
pub use timelines::{
    TimelinesService, TimelinesServiceTrait, UserRequest, UserTimelineRequest,
};
