pub mod mdq;
