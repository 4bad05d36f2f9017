pub mod track_ops;
