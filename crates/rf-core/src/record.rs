use crate::Error;
use crate::raster::Raster;

/// Plain-object form of a raster for crossing serialization boundaries.
///
/// `channels` is 4 (interleaved RGBA) or 3 (RGB, alpha dropped). The record
/// carries no layout invariant of its own; converting back through
/// [`Raster::from_record`] re-validates and re-applies the construction rules
/// of [`Raster::from_vec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterRecord {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn to_record(&self) -> RasterRecord {
        RasterRecord {
            width: self.width(),
            height: self.height(),
            channels: 4,
            data: self.data().to_vec(),
        }
    }

    /// Record form with the alpha channel stripped.
    pub fn to_rgb_record(&self) -> RasterRecord {
        let mut data = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels() {
            data.extend_from_slice(&[px.r, px.g, px.b]);
        }

        RasterRecord {
            width: self.width(),
            height: self.height(),
            channels: 3,
            data,
        }
    }

    /// Rebuilds a raster from its record form.
    ///
    /// The byte length must equal `width * height * channels` for the
    /// declared channel count (3 or 4); anything else is a
    /// `DimensionMismatch`.
    pub fn from_record(record: RasterRecord) -> Result<Self, Error> {
        let mismatch = Error::DimensionMismatch {
            width: record.width,
            height: record.height,
            actual: record.data.len(),
        };

        if record.channels != 3 && record.channels != 4 {
            return Err(mismatch);
        }

        let expected = (record.width as usize)
            .checked_mul(record.height as usize)
            .and_then(|n| n.checked_mul(record.channels as usize))
            .ok_or(mismatch.clone())?;

        if record.data.len() != expected {
            return Err(mismatch);
        }

        Self::from_vec(record.width, record.height, record.data)
    }
}

#[cfg(test)]
mod tests {
    use crate::raster::Raster;

    use super::RasterRecord;

    #[test]
    fn record_round_trip_keeps_rgba() {
        let img = Raster::from_vec(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).expect("valid raster");
        let record = img.to_record();

        assert_eq!(record.channels, 4);
        assert_eq!(Raster::from_record(record).expect("valid record"), img);
    }

    #[test]
    fn rgb_record_strips_alpha() {
        let img = Raster::from_vec(2, 1, vec![1, 2, 3, 9, 4, 5, 6, 9]).expect("valid raster");
        let record = img.to_rgb_record();

        assert_eq!(record.channels, 3);
        assert_eq!(record.data, vec![1, 2, 3, 4, 5, 6]);

        // Alpha comes back opaque after a 3-channel round trip.
        let back = Raster::from_record(record).expect("valid record");
        assert_eq!(back.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn from_record_checks_declared_channel_count() {
        // 2x1 with 8 bytes is a fine RGBA raster, but the record claims 3
        // channels, so the length no longer matches.
        let record = RasterRecord {
            width: 2,
            height: 1,
            channels: 3,
            data: vec![0u8; 8],
        };
        assert!(Raster::from_record(record).is_err());

        let record = RasterRecord {
            width: 2,
            height: 1,
            channels: 5,
            data: vec![0u8; 10],
        };
        assert!(Raster::from_record(record).is_err());
    }
}
