//! Built-in license catalogue.
//!
//! The order of [`License::ALL`] is significant: it is the order shown to
//! users when they pick a license, and the registry identifies licenses by
//! their zero-based position in it.

use std::fmt;

/// A license a package can be published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum License {
    /// Apache License 2.0.
    Apache2,
    /// BSD 3-Clause "New" or "Revised" License.
    Bsd3Clause,
    /// BSD 2-Clause "Simplified" License.
    Bsd2Clause,
    /// GNU General Public License v2.0.
    Gpl2,
    /// GNU General Public License v3.0.
    Gpl3,
    /// GNU Lesser General Public License v2.1.
    Lgpl21,
    /// GNU Lesser General Public License v3.0.
    Lgpl3,
    /// MIT License.
    Mit,
    /// Mozilla Public License 2.0.
    Mpl2,
    /// Eclipse Public License 1.0.
    Epl1,
    /// No license chosen yet; the user will decide later.
    Undecided,
}

impl License {
    /// Every license, in selection order. [`License::Undecided`] is last.
    pub const ALL: [Self; 11] = [
        Self::Apache2,
        Self::Bsd3Clause,
        Self::Bsd2Clause,
        Self::Gpl2,
        Self::Gpl3,
        Self::Lgpl21,
        Self::Lgpl3,
        Self::Mit,
        Self::Mpl2,
        Self::Epl1,
        Self::Undecided,
    ];

    /// Returns the stable identifier of the license.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Apache2 => "apache-2.0",
            Self::Bsd3Clause => "bsd-3-clause",
            Self::Bsd2Clause => "bsd-2-clause",
            Self::Gpl2 => "gpl-2.0",
            Self::Gpl3 => "gpl-3.0",
            Self::Lgpl21 => "lgpl-2.1",
            Self::Lgpl3 => "lgpl-3.0",
            Self::Mit => "mit",
            Self::Mpl2 => "mpl-2.0",
            Self::Epl1 => "epl-1.0",
            Self::Undecided => "undecided",
        }
    }

    /// Returns the name shown to users and written into build files.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Apache2 => "Apache-2.0",
            Self::Bsd3Clause => "BSD 3-Clause",
            Self::Bsd2Clause => "BSD 2-Clause",
            Self::Gpl2 => "GPL-2.0",
            Self::Gpl3 => "GPL-3.0",
            Self::Lgpl21 => "LGPL-2.1",
            Self::Lgpl3 => "LGPL-3.0",
            Self::Mit => "MIT",
            Self::Mpl2 => "MPL-2.0",
            Self::Epl1 => "EPL-1.0",
            Self::Undecided => "other license (decide later)",
        }
    }

    /// Returns the canonical URL of the license text, if one is chosen.
    #[must_use]
    pub const fn url(self) -> Option<&'static str> {
        match self {
            Self::Apache2 => Some("http://opensource.org/licenses/Apache-2.0"),
            Self::Bsd3Clause => Some("http://opensource.org/licenses/BSD-3-Clause"),
            Self::Bsd2Clause => Some("http://opensource.org/licenses/BSD-2-Clause"),
            Self::Gpl2 => Some("http://opensource.org/licenses/GPL-2.0"),
            Self::Gpl3 => Some("http://opensource.org/licenses/GPL-3.0"),
            Self::Lgpl21 => Some("http://opensource.org/licenses/LGPL-2.1"),
            Self::Lgpl3 => Some("http://opensource.org/licenses/LGPL-3.0"),
            Self::Mit => Some("http://opensource.org/licenses/MIT"),
            Self::Mpl2 => Some("http://opensource.org/licenses/MPL-2.0"),
            Self::Epl1 => Some("http://opensource.org/licenses/EPL-1.0"),
            Self::Undecided => None,
        }
    }

    /// Returns true for the "decide later" sentinel.
    #[must_use]
    pub const fn is_undecided(self) -> bool {
        matches!(self, Self::Undecided)
    }

    /// Returns the identifier the registry uses for this license.
    #[must_use]
    pub const fn registry_id(self) -> u32 {
        match self {
            Self::Apache2 => 0,
            Self::Bsd3Clause => 1,
            Self::Bsd2Clause => 2,
            Self::Gpl2 => 3,
            Self::Gpl3 => 4,
            Self::Lgpl21 => 5,
            Self::Lgpl3 => 6,
            Self::Mit => 7,
            Self::Mpl2 => 8,
            Self::Epl1 => 9,
            Self::Undecided => 10,
        }
    }

    /// Maps a one-based menu selection to a license.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_package_core::License;
    ///
    /// assert_eq!(License::from_selection(1), Some(License::Apache2));
    /// assert_eq!(License::from_selection(11), Some(License::Undecided));
    /// assert_eq!(License::from_selection(0), None);
    /// ```
    #[must_use]
    pub fn from_selection(selection: usize) -> Option<Self> {
        selection
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Renders the numbered selection menu.
    #[must_use]
    pub fn selection_menu() -> String {
        let mut menu = String::from("Please select a license for your package (enter index):\n");
        for (index, license) in Self::ALL.iter().enumerate() {
            menu.push_str(&format!(
                "{}.\t{}\t\turl: {}\n",
                index + 1,
                license.display_name(),
                license.url().unwrap_or("n/a")
            ));
        }
        menu
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
