pub mod customer;
pub mod queues;
pub mod record_sheet;
pub mod role;
