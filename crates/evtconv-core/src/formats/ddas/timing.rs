use super::error::DdasError;
use super::layout;

/// Raw and CFD-corrected event times in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    pub raw: f64,
    pub corrected: f64,
}

/// Digitizer sampling frequency, selecting the CFD correction formula.
///
/// The set is closed; descriptor values outside {100, 250, 500} fail at
/// construction and never reach the decoder.
///
/// # Examples
/// ```
/// use evtconv_core::ModuleFrequency;
///
/// let freq = ModuleFrequency::from_raw(100)?;
/// let time = freq.correct(100, 0x4000_0000);
/// assert_eq!(time.raw, 1000.0);
/// assert_eq!(time.corrected, 1005.0);
/// # Ok::<(), evtconv_core::DdasError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFrequency {
    Mhz100,
    Mhz250,
    Mhz500,
}

impl ModuleFrequency {
    /// Build a frequency from the raw device-descriptor value.
    pub fn from_raw(value: i16) -> Result<Self, DdasError> {
        match value {
            100 => Ok(Self::Mhz100),
            250 => Ok(Self::Mhz250),
            500 => Ok(Self::Mhz500),
            _ => Err(DdasError::UnknownFrequency { value }),
        }
    }

    /// Compute raw and corrected event times from the coarse low word and
    /// the CFD word. Formulas follow the PXI digitizer manuals; the 64-bit
    /// coarse timestamp is `time_low + time_high * 2^32` for every
    /// frequency.
    pub fn correct(self, time_low: u32, cfd_word: u32) -> EventTime {
        let time_high = (cfd_word >> layout::TIME_HIGH_SHIFT) & layout::MASK_16BIT;
        let evt = (time_low as u64 + ((time_high as u64) << 32)) as f64;

        match self {
            Self::Mhz100 => {
                let frac = (cfd_word >> layout::CFD_FRAC_SHIFT) & layout::MASK_15BIT;
                let _force = (cfd_word >> layout::CFD_FORCE_SHIFT) & layout::MASK_1BIT;
                EventTime {
                    raw: evt * 10.0,
                    corrected: (evt + frac as f64 / 32768.0) * 10.0,
                }
            }
            Self::Mhz250 => {
                let frac = (cfd_word >> layout::CFD_FRAC_SHIFT) & layout::MASK_14BIT;
                let parity = (cfd_word >> layout::CFD_PARITY_SHIFT) & layout::MASK_1BIT;
                EventTime {
                    raw: evt * 8.0,
                    corrected: (evt * 2.0 - parity as f64 + frac as f64 / 16384.0) * 4.0,
                }
            }
            Self::Mhz500 => {
                let frac = (cfd_word >> layout::CFD_FRAC_SHIFT) & layout::MASK_13BIT;
                let source = (cfd_word >> layout::CFD_SOURCE_SHIFT) & layout::MASK_3BIT;
                EventTime {
                    raw: evt * 10.0,
                    corrected: (evt * 5.0 + source as f64 - 1.0 + frac as f64 / 8192.0) * 2.0,
                }
            }
        }
    }
}
