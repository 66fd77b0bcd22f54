pub mod client_side;
