//! [`Locale`]-related definitions.

use crate::define_kind;

define_kind! {
    #[doc = "Language used to render human-readable values."]
    enum Locale {
        #[doc = "German (Switzerland)."]
        De = 1,

        #[doc = "French (Switzerland)."]
        Fr = 2,

        #[doc = "Italian (Switzerland)."]
        It = 3,

        #[doc = "English."]
        En = 4,
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::De
    }
}

impl Locale {
    /// Returns the full name of the provided `month` (in `1..=12` range) in
    /// this [`Locale`].
    ///
    /// # Panics
    ///
    /// If the `month` is out of `1..=12` range.
    #[must_use]
    pub fn month_name(self, month: u8) -> &'static str {
        const DE: [&str; 12] = [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ];
        const FR: [&str; 12] = [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ];
        const IT: [&str; 12] = [
            "gennaio",
            "febbraio",
            "marzo",
            "aprile",
            "maggio",
            "giugno",
            "luglio",
            "agosto",
            "settembre",
            "ottobre",
            "novembre",
            "dicembre",
        ];
        const EN: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];

        let names = match self {
            Self::De => &DE,
            Self::Fr => &FR,
            Self::It => &IT,
            Self::En => &EN,
        };
        names[usize::from(month) - 1]
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Locale;

    #[test]
    fn month_names() {
        assert_eq!(Locale::De.month_name(3), "März");
        assert_eq!(Locale::Fr.month_name(8), "août");
        assert_eq!(Locale::It.month_name(12), "dicembre");
        assert_eq!(Locale::En.month_name(1), "January");
    }

    #[test]
    fn from_str() {
        assert_eq!(Locale::from_str("DE").unwrap(), Locale::De);
        assert_eq!(Locale::from_str("FR").unwrap(), Locale::Fr);
        assert!(Locale::from_str("RU").is_err());
    }
}
