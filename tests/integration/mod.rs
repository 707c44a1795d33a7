pub mod class_booking_test;
