pub mod allocator;
pub mod goodseeds;
pub mod users;
