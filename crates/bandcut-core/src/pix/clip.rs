//! Row-band extraction

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Extract the full-width band of rows `[start, end)`.
    ///
    /// Rows are copied word by word, so this is cheap for any depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the band is empty or reaches
    /// past the bottom of the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use bandcut_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit8).unwrap();
    /// let band = pix.clip_rows(60, 80).unwrap();
    /// assert_eq!(band.width(), 100);
    /// assert_eq!(band.height(), 20);
    /// ```
    pub fn clip_rows(&self, start: u32, end: u32) -> Result<Pix> {
        if start >= end || end > self.height() {
            return Err(Error::InvalidParameter(format!(
                "row band [{}, {}) is empty or outside image height {}",
                start,
                end,
                self.height()
            )));
        }

        let mut pixd = PixMut::new(self.width(), end - start, self.depth())?;
        pixd.set_spp(self.spp());
        pixd.set_resolution(self.xres(), self.yres());
        pixd.set_informat(self.informat());

        let wpl = self.wpl() as usize;
        let src = &self.data()[start as usize * wpl..end as usize * wpl];
        pixd.data_mut().copy_from_slice(src);

        Ok(pixd.into())
    }
}
