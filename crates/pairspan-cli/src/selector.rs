use pairspan_core::models::UnknownDateFormat;
use pairspan_core::DateFormat;

/// Holds the date format the next transfer will be tagged with.
#[derive(Debug, Clone, Default)]
pub struct DateFormatSelector {
    current: DateFormat,
}

impl DateFormatSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &'static [DateFormat] {
        &DateFormat::ALL
    }

    pub fn current(&self) -> DateFormat {
        self.current
    }

    /// Only transfers started after this call see the new format.
    pub fn select(&mut self, format: DateFormat) {
        tracing::info!("New date pattern selected: {}", format);
        self.current = format;
    }

    pub fn select_pattern(&mut self, pattern: &str) -> Result<DateFormat, UnknownDateFormat> {
        let format = pattern.parse()?;
        self.select(format);
        Ok(format)
    }
}
