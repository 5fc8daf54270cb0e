pub mod goodseeds;
pub mod users;
