//! Coordinate types for ellipsoidal geometry
//!
//! Two value types form the vocabulary of this crate:
//!
//! - [`Cartesian3`]: a point or direction in the body-fixed Cartesian frame
//! - [`Cartographic`]: a geodetic longitude/latitude/height triple relative
//!   to an ellipsoid surface
//!
//! Conversions between the two live on [`crate::ellipsoid::Ellipsoid`],
//! since they depend on the reference body shape.

pub mod cartesian;
pub mod cartographic;

pub use cartesian::Cartesian3;
pub use cartographic::Cartographic;
