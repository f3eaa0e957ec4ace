mod tsort;

pub use tsort::{topo_sort, Error};
