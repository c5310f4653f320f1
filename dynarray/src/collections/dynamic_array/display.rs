//! Text rendering of a [`DynamicArray`] as `{e0, e1, ..., en}`.

use core::fmt::{self, Display, Write};

use super::DynamicArray;

impl<T: Display> DynamicArray<T> {
    /// Writes `{e0, e1, ..., en}` and a trailing newline into `sink`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the sink reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::dynamic_array;
    ///
    /// let mut out = String::new();
    /// dynamic_array![1, 2, 3].write_to(&mut out).unwrap();
    /// assert_eq!(out, "{1, 2, 3}\n");
    /// ```
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        writeln!(sink, "{self}")
    }

    /// Same as [`write_to`](Self::write_to), for byte-oriented sinks.
    ///
    /// # Errors
    ///
    /// Returns whatever I/O error the sink reports.
    #[cfg(feature = "std")]
    pub fn write_to_io<W: std::io::Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<()> {
        writeln!(sink, "{self}")
    }

    /// Prints the array to standard output.
    ///
    /// # Errors
    ///
    /// Fails if standard output is closed or cannot be written.
    #[cfg(feature = "std")]
    pub fn print(&self) -> std::io::Result<()> {
        self.write_to_io(&mut std::io::stdout().lock())
    }
}

impl<T: Display> Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for index in 0..self.len() {
            if index > 0 {
                f.write_str(", ")?;
            }
            let element = self.get(index).map_err(|_| fmt::Error)?;
            Display::fmt(element, f)?;
        }
        f.write_char('}')
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
