//! `campus-contact` — contact events and the transmission model seam.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`event`]   | `ContactEvent<'a>` — one active roster at one tick              |
//! | [`model`]   | `TransmissionModel` trait                                       |
//! | [`noop`]    | `NoopTransmission` — placeholder that never changes health      |
//!
//! # Design notes
//!
//! The tick driver in campus-sim visits active rosters in schedule order and
//! calls [`TransmissionModel::on_contact`] once per roster.  The model sees
//! the enrolled students read-only and receives a
//! [`HealthWriter`](campus_schedule::HealthWriter) as its only write access,
//! so it can infect or recover students but never change who attends what.

pub mod event;
pub mod model;
pub mod noop;


pub use event::ContactEvent;
pub use model::TransmissionModel;
pub use noop::NoopTransmission;
