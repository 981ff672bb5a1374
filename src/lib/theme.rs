//! Shared Tailwind class constants to keep forms and cards visually consistent
//! across pages.

pub struct Theme;

impl Theme {
    /// Form field label.
    pub const LABEL: &'static str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

    /// Text input used by the auth forms.
    pub const INPUT: &'static str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

    /// Bordered content card.
    pub const CARD: &'static str = "p-6 bg-white dark:bg-gray-800 rounded-xl border border-gray-200 dark:border-gray-700 shadow-sm";

    /// Page heading.
    pub const HEADING: &'static str = "text-2xl font-semibold text-gray-900 dark:text-white";

    /// Plain navigation link in the header.
    pub const NAV_LINK: &'static str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";
}
