pub mod destination_ip;
pub mod prometheus;
pub mod uid;
