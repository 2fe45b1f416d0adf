mod convolution;
mod edges;
mod file_io;
mod lifecycle;
mod statistics;
