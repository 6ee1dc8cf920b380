//! Pure query functions over in-memory entity slices.
//!
//! The local store has no secondary index, so every owner-scoped read loads
//! the whole collection and narrows it here.

use chrono::NaiveDate;

use super::booking::Booking;
use super::entity::Entity;
use super::kennel::Kennel;

/// Keeps only the entities whose owner key matches.
pub fn filter_by_owner<E: Entity>(entities: Vec<E>, owner_key: &str) -> Vec<E> {
    entities
        .into_iter()
        .filter(|entity| entity.owner_key() == owner_key)
        .collect()
}

/// Case-insensitive match on kennel name or city, sorted by name.
///
/// A blank query matches every kennel.
pub fn search_kennels<'a>(kennels: &'a [Kennel], query: &str) -> Vec<&'a Kennel> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<&Kennel> = kennels
        .iter()
        .filter(|kennel| {
            needle.is_empty()
                || kennel.name.to_lowercase().contains(&needle)
                || kennel
                    .city
                    .as_ref()
                    .is_some_and(|city| city.to_lowercase().contains(&needle))
        })
        .collect();
    matches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    matches
}

/// Confirmed bookings at a kennel arriving on `date`.
pub fn check_ins_on<'a>(
    bookings: &'a [Booking],
    kennel_id: &str,
    date: NaiveDate,
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|booking| booking.kennel_id == kennel_id && booking.checks_in_on(date))
        .collect()
}

/// Bookings at a kennel with pets on site on `date`, earliest arrival first.
pub fn active_bookings_on<'a>(
    bookings: &'a [Booking],
    kennel_id: &str,
    date: NaiveDate,
) -> Vec<&'a Booking> {
    let mut active: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| booking.kennel_id == kennel_id && booking.is_active_on(date))
        .collect();
    active.sort_by_key(|booking| booking.check_in);
    active
}
