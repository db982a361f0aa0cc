#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use cvkit_dataset as dataset;

#[doc(inline)]
pub use cvkit_image as image;

#[doc(inline)]
pub use cvkit_imgproc as imgproc;

#[doc(inline)]
pub use cvkit_io as io;

#[doc(inline)]
pub use cvkit_3d as k3d;

#[doc(inline)]
pub use cvkit_serialize as serialize;
