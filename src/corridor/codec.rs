//! Flat `f64` buffer transfer of corridor outline parameters.
//!
//! Layout of one packed instance:
//!
//! | slots | content |
//! |-------|---------|
//! | 1 | position count `n` |
//! | 3n | position coordinates `x, y, z` |
//! | 3 | ellipsoid radii |
//! | 1 | width |
//! | 1 | height |
//! | 1 | extruded height, `NaN` when absent |
//! | 1 | corner type code |
//! | 1 | granularity |

use crate::error::{CodecError, Result};
use crate::geometry::Ellipsoid;
use crate::math::Point3;

use super::outline::{validate, CorridorOutlineGeometry};
use super::CornerType;

/// Scalar slots following the positions: radii, width, height, extruded
/// height, corner code, granularity.
const TRAILING_SLOTS: usize = 3 + 5;

/// Types that can be written to and read back from a flat `f64` buffer.
pub trait Packable: Sized {
    /// Number of slots [`pack`](Self::pack) writes.
    fn packed_length(&self) -> usize;

    /// Writes `self` into `array` starting at `start`, growing the buffer if
    /// it is too short. Slots outside the written range are left untouched.
    ///
    /// Returns the offset one past the last written slot.
    fn pack(&self, array: &mut Vec<f64>, start: usize) -> usize;

    /// Reads an instance from `array` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is truncated or holds invalid values.
    fn unpack(array: &[f64], start: usize) -> Result<Self>;
}

/// Writes consecutive slots, growing the target as needed.
struct SlotWriter<'a> {
    array: &'a mut Vec<f64>,
    cursor: usize,
}

impl<'a> SlotWriter<'a> {
    fn new(array: &'a mut Vec<f64>, start: usize, len: usize) -> Self {
        if array.len() < start + len {
            array.resize(start + len, 0.0);
        }
        Self {
            array,
            cursor: start,
        }
    }

    fn write(&mut self, value: f64) {
        self.array[self.cursor] = value;
        self.cursor += 1;
    }
}

/// Reads consecutive slots with bounds checks.
struct SlotReader<'a> {
    array: &'a [f64],
    cursor: usize,
}

impl<'a> SlotReader<'a> {
    fn new(array: &'a [f64], start: usize) -> Self {
        Self {
            array,
            cursor: start,
        }
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.array.len().saturating_sub(self.cursor);
        if available < needed {
            return Err(CodecError::UnexpectedEnd {
                offset: self.cursor,
                needed,
                available,
            }
            .into());
        }
        Ok(())
    }

    fn read(&mut self) -> Result<f64> {
        self.ensure(1)?;
        let value = self.array[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    fn read_point(&mut self) -> Result<Point3> {
        Ok(Point3::new(self.read()?, self.read()?, self.read()?))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    fn read_count(&mut self) -> Result<usize> {
        let raw = self.read()?;
        if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > usize::MAX as f64 {
            return Err(CodecError::InvalidPointCount(raw).into());
        }
        Ok(raw as usize)
    }
}

/// Everything except the positions, decoded and validated.
struct Scalars {
    ellipsoid: Ellipsoid,
    width: f64,
    height: f64,
    extruded_height: Option<f64>,
    corner_type: CornerType,
    granularity: f64,
}

impl Scalars {
    fn read(reader: &mut SlotReader<'_>) -> Result<Self> {
        reader.ensure(TRAILING_SLOTS)?;
        let radii = reader.read_point()?;
        let ellipsoid = Ellipsoid::new(radii.x, radii.y, radii.z)?;
        let width = reader.read()?;
        let height = reader.read()?;
        let extruded_height = Some(reader.read()?).filter(|h| !h.is_nan());
        let code = reader.read()?;
        let corner_type = CornerType::from_code(code).ok_or(CodecError::UnknownCornerType(code))?;
        let granularity = reader.read()?;
        validate(granularity, extruded_height)?;

        Ok(Self {
            ellipsoid,
            width,
            height,
            extruded_height,
            corner_type,
            granularity,
        })
    }
}

impl Packable for CorridorOutlineGeometry {
    fn packed_length(&self) -> usize {
        1 + self.positions.len() * 3 + TRAILING_SLOTS
    }

    #[allow(clippy::cast_precision_loss)]
    fn pack(&self, array: &mut Vec<f64>, start: usize) -> usize {
        let mut w = SlotWriter::new(array, start, self.packed_length());

        w.write(self.positions.len() as f64);
        for p in &self.positions {
            w.write(p.x);
            w.write(p.y);
            w.write(p.z);
        }

        let radii = self.ellipsoid.radii();
        w.write(radii.x);
        w.write(radii.y);
        w.write(radii.z);

        w.write(self.width);
        w.write(self.height);
        w.write(self.extruded_height.unwrap_or(f64::NAN));
        w.write(f64::from(self.corner_type.code()));
        w.write(self.granularity);

        w.cursor
    }

    fn unpack(array: &[f64], start: usize) -> Result<Self> {
        let mut reader = SlotReader::new(array, start);
        let count = reader.read_count()?;
        reader.ensure(count.saturating_mul(3))?;
        let positions = (0..count)
            .map(|_| reader.read_point())
            .collect::<Result<Vec<_>>>()?;
        let scalars = Scalars::read(&mut reader)?;

        Ok(Self {
            positions,
            width: scalars.width,
            corner_type: scalars.corner_type,
            granularity: scalars.granularity,
            height: scalars.height,
            extruded_height: scalars.extruded_height,
            ellipsoid: scalars.ellipsoid,
        })
    }
}

impl CorridorOutlineGeometry {
    /// Number of slots this instance occupies when packed.
    #[must_use]
    pub fn packed_length(&self) -> usize {
        Packable::packed_length(self)
    }

    /// Unpacks into an existing instance, reusing its position allocation.
    ///
    /// The holder is left unchanged when the buffer is invalid.
    ///
    /// # Errors
    ///
    /// Same as [`Packable::unpack`].
    pub fn unpack_into(array: &[f64], start: usize, holder: &mut Self) -> Result<()> {
        let mut reader = SlotReader::new(array, start);
        let count = reader.read_count()?;
        let positions_start = reader.cursor;
        reader.ensure(count.saturating_mul(3))?;
        reader.cursor += count * 3;
        let scalars = Scalars::read(&mut reader)?;

        let mut positions = SlotReader::new(array, positions_start);
        holder.positions.clear();
        holder.positions.reserve(count);
        for _ in 0..count {
            holder.positions.push(positions.read_point()?);
        }

        holder.width = scalars.width;
        holder.corner_type = scalars.corner_type;
        holder.granularity = scalars.granularity;
        holder.height = scalars.height;
        holder.extruded_height = scalars.extruded_height;
        holder.ellipsoid = scalars.ellipsoid;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::corridor::CorridorOutlineOptions;
    use crate::error::CorridorError;
    use crate::math::RADIANS_PER_DEGREE;

    fn straight() -> CorridorOutlineGeometry {
        let positions = Ellipsoid::wgs84().cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -35.0]);
        CorridorOutlineGeometry::new(
            CorridorOutlineOptions::new(positions, 30_000.0)
                .with_corner_type(CornerType::Beveled)
                .with_granularity(0.1),
        )
        .unwrap()
    }

    #[test]
    fn packed_layout() {
        let geometry = straight();
        let p = geometry.positions().to_vec();
        let [rx, ry, rz] = Ellipsoid::WGS84_RADII;

        let mut packed = Vec::new();
        let end = geometry.pack(&mut packed, 0);

        assert_eq!(end, 15);
        assert_eq!(geometry.packed_length(), 15);
        assert_eq!(packed.len(), 15);
        let expected = [
            2.0, p[0].x, p[0].y, p[0].z, p[1].x, p[1].y, p[1].z, rx, ry, rz, 30_000.0, 0.0,
        ];
        assert_eq!(&packed[..12], &expected);
        assert!(packed[12].is_nan());
        assert_eq!(packed[13], 2.0);
        assert_eq!(packed[14], 0.1);
    }

    #[test]
    fn round_trip_without_extrusion() {
        let geometry = straight();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);
        let unpacked = CorridorOutlineGeometry::unpack(&packed, 0).unwrap();
        assert_eq!(unpacked, geometry);
        assert_eq!(unpacked.extruded_height(), None);
    }

    #[test]
    fn zero_extrusion_is_not_absent() {
        let positions = Ellipsoid::wgs84().cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -35.0]);
        let geometry = CorridorOutlineGeometry::new(
            CorridorOutlineOptions::new(positions, 30_000.0)
                .with_height(100.0)
                .with_extruded_height(0.0),
        )
        .unwrap();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);
        let unpacked = CorridorOutlineGeometry::unpack(&packed, 0).unwrap();
        assert_eq!(unpacked.extruded_height(), Some(0.0));
        assert_eq!(unpacked.height(), 100.0);
        assert_eq!(unpacked.corner_type(), CornerType::Mitered);
        assert_eq!(unpacked.granularity(), RADIANS_PER_DEGREE);
    }

    #[test]
    fn instances_share_one_buffer() {
        let a = straight();
        let positions = Ellipsoid::wgs84()
            .cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -31.0, 91.0, -31.0]);
        let b = CorridorOutlineGeometry::new(
            CorridorOutlineOptions::new(positions, 5_000.0)
                .with_corner_type(CornerType::Rounded)
                .with_extruded_height(2_000.0),
        )
        .unwrap();

        let mut packed = vec![-1.0; 3];
        let mid = a.pack(&mut packed, 3);
        let end = b.pack(&mut packed, mid);

        assert_eq!(&packed[..3], &[-1.0; 3]);
        assert_eq!(mid, 3 + a.packed_length());
        assert_eq!(end, packed.len());
        assert_eq!(CorridorOutlineGeometry::unpack(&packed, 3).unwrap(), a);
        assert_eq!(CorridorOutlineGeometry::unpack(&packed, mid).unwrap(), b);
    }

    #[test]
    fn pack_leaves_other_slots_alone() {
        let geometry = straight();
        let mut packed = vec![7.0; 20];
        let end = geometry.pack(&mut packed, 2);
        assert_eq!(end, 17);
        assert_eq!(packed.len(), 20);
        assert_eq!(&packed[..2], &[7.0; 2]);
        assert_eq!(&packed[17..], &[7.0; 3]);
    }

    #[test]
    fn unpack_into_reuses_holder() {
        let geometry = straight();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);

        let mut holder = CorridorOutlineGeometry::new(CorridorOutlineOptions::new(
            vec![Point3::origin(); 5],
            1.0,
        ))
        .unwrap();
        CorridorOutlineGeometry::unpack_into(&packed, 0, &mut holder).unwrap();
        assert_eq!(holder, geometry);
    }

    #[test]
    fn unpack_into_keeps_holder_on_error() {
        let geometry = straight();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);
        packed[13] = 9.0;

        let mut holder = straight();
        holder.width = 1.0;
        let before = holder.clone();
        assert!(CorridorOutlineGeometry::unpack_into(&packed, 0, &mut holder).is_err());
        assert_eq!(holder, before);
    }

    #[test]
    fn truncated_buffer() {
        let geometry = straight();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);

        for len in [0, 1, 6, 14] {
            let err = CorridorOutlineGeometry::unpack(&packed[..len], 0).unwrap_err();
            assert!(
                matches!(err, CorridorError::Codec(CodecError::UnexpectedEnd { .. })),
                "len {len}: {err}"
            );
        }
    }

    #[test]
    fn unknown_corner_code() {
        let mut packed = Vec::new();
        straight().pack(&mut packed, 0);
        packed[13] = 1.5;
        let err = CorridorOutlineGeometry::unpack(&packed, 0).unwrap_err();
        assert!(matches!(err, CorridorError::Codec(CodecError::UnknownCornerType(c)) if c == 1.5));
    }

    #[test]
    fn invalid_point_count() {
        for count in [-1.0, 1.5, f64::NAN, f64::INFINITY] {
            let err = CorridorOutlineGeometry::unpack(&[count, 0.0, 0.0], 0).unwrap_err();
            assert!(matches!(err, CorridorError::Codec(CodecError::InvalidPointCount(_))));
        }
    }

    #[test]
    fn degenerate_radii_are_rejected() {
        let mut packed = Vec::new();
        straight().pack(&mut packed, 0);
        packed[7] = 0.0;
        let err = CorridorOutlineGeometry::unpack(&packed, 0).unwrap_err();
        assert!(matches!(err, CorridorError::Geometry(_)));
    }

    #[test]
    fn unpacked_geometry_builds_the_same_mesh() {
        let geometry = straight();
        let mut packed = Vec::new();
        geometry.pack(&mut packed, 0);
        let unpacked = CorridorOutlineGeometry::unpack(&packed, 0).unwrap();
        let a = geometry.create_geometry().unwrap();
        let b = unpacked.create_geometry().unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.indices, b.indices);
    }
}
