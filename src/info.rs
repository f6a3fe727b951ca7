//! Static copy for the About and Contact panels.

pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
}

pub const BENEFITS: [Benefit; 4] = [
    Benefit {
        title: "Water Efficiency",
        description: "Uses only 3-5 gallons per cycle vs 20+ gallons for hand washing",
    },
    Benefit {
        title: "Energy Saving",
        description: "ENERGY STAR models save 25% more energy than standard models",
    },
    Benefit {
        title: "Cost Effective",
        description: "Saves $40+ annually on utility bills",
    },
    Benefit {
        title: "Hygienic",
        description: "Heats water to 140°F+ for better sanitization",
    },
];

pub struct ContactLine {
    pub heading: &'static str,
    pub lines: &'static [&'static str],
}

pub const CONTACT: [ContactLine; 3] = [
    ContactLine {
        heading: "Phone Support",
        lines: &["+1 (800) 123-4567", "24/7 Availability"],
    },
    ContactLine {
        heading: "Our Location",
        lines: &["123 Dishwasher Street", "Tech City, TC 12345"],
    },
    ContactLine {
        heading: "Working Hours",
        lines: &["Mon-Fri: 9AM - 6PM (EST)", "Sat: 10AM - 4PM (EST)", "Closed on Sundays"],
    },
];
