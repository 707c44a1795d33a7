// API routes and handlers

pub mod bookings;
pub mod classes;
pub mod facilities;
pub mod health;
pub mod memberships;
pub mod personal_training;
pub mod routes;
pub mod trainers;
pub mod users;
