pub mod w_tinylfu;
