pub mod cats;
pub mod salary;
