pub mod pseudo_ways_ops;
