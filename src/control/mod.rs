//! Pure control calculations, free of I/O.

pub mod off_delay;
