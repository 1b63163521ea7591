//! Ports - Interfaces between the export core and the outside world

pub mod outbound;
