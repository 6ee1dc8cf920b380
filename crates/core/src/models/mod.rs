//! Domain entities for the boarding business.

mod booking;
mod entity;
mod health;
mod invoice;
mod kennel;
mod operations;
mod pet;
mod preferences;
mod stay;
mod user;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use entity::{Collection, Entity};
pub use health::{MedicalRecord, NewMedicalRecord, NewVaccine, Vaccine};
pub use invoice::{Invoice, InvoiceStatus, NewInvoice};
pub use kennel::{Kennel, KennelRun, NewKennel, NewKennelRun, RunSize};
pub use operations::{active_bookings_on, check_ins_on, filter_by_owner, search_kennels};
pub use pet::{NewPet, Pet, Species};
pub use preferences::{Preferences, Theme, PREFERENCES_KEY};
pub use stay::{NewStayUpdate, StayUpdate};
pub use user::{NewUser, User, UserRole};
