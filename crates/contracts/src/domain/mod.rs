pub mod common;

// Агрегаты (a001-a003)
pub mod a001_wine;
pub mod a002_event;
pub mod a003_booking;

// Request-scoped контракты без собственных таблиц (a004-a005)
pub mod a004_cart;
pub mod a005_sommelier;
