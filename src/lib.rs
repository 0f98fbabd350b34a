pub mod io;
pub mod rendering;
