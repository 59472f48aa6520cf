use std::fmt;

use super::ScenarioKind;
use crate::client::Service;

pub const CREDENTIAL_ADDRESSES: &[&str] = &[
    "Санкт-Петербург, Пулковское шоссе, дом 36, корпус 4",
    "Patio de Gale, Praça do Comércio, Lisbon, Portugal",
];

pub const CONSISTENCY_ADDRESSES: &[&str] = &[
    "Санкт-Петербург, Пулковское шоссе, дом 36, корпус 4",
    "СПб ПарашУтная ул 65 стр 1",
    "Мурманская обл.,г. Полярные Зори, ул. Партизан Заполярья 4",
    "Patio de Gale, Praça do Comércio, Lisbon, Portugal",
    "СПб, Мавзолей",
    "ул. Бравых Гедонистов 6666, London, Greate Britain",
    "Мультивселенная №;%*",
    "Первое место приземления пришельцев",
    "()-!!",
];

pub const LANDMARKS: &[&str] = &[
    "Санкт-Петербург, Дворец Юсуповых",
    "Москва, Мавзолей",
    "London, Big Ben",
    "Egypt, Pyramid of Khufu",
    "Второе место приземления пришельцев",
    "*?:%",
];

pub const LANDMARK_PLACE_TYPE: &str = "pharmacy";

pub const METRO_ADDRESSES: &[&str] = &[
    "Санкт-Петербург, Пулковское шоссе, дом 36, корпус 4",
    "СПб ПарашУтная ул 65 стр 1",
    "Мурманская обл.,г. Полярные Зори, ул. Партизан Заполярья 4",
    "Patio de Gale, Praça do Comércio, Lisbon, Portugal",
    "СПб, Мавзолей",
    "ул. Бравых Гедонистов 6666, London, Greate Britain",
    "Мультивселенная №;%*",
    "()-!!",
];

pub const PLACE_TYPES: &[&str] = &["fishing store", "hairdresser", "McDonald's", "dentist", "$%^"];

/// One parametrized input of a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum Case {
    Credentials { service: Service, address: String },
    Consistency { address: String },
    Pharmacies { landmark: String, place_type: String },
    MetroPlaces { address: String, place_type: String },
}

impl Case {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Case::Credentials { .. } => ScenarioKind::Credentials,
            Case::Consistency { .. } => ScenarioKind::Consistency,
            Case::Pharmacies { .. } => ScenarioKind::Pharmacies,
            Case::MetroPlaces { .. } => ScenarioKind::MetroPlaces,
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Case::Credentials { service, address } => write!(f, "{} / {}", service, address),
            Case::Consistency { address } => f.write_str(address),
            Case::Pharmacies { landmark, place_type } => write!(f, "{} near {}", place_type, landmark),
            Case::MetroPlaces { address, place_type } => write!(f, "{} near metro near {}", place_type, address),
        }
    }
}

/// Expand a scenario into its full parameter table
pub fn all_cases(kind: ScenarioKind) -> Vec<Case> {
    match kind {
        ScenarioKind::Credentials => CREDENTIAL_ADDRESSES
            .iter()
            .flat_map(|address| {
                Service::ALL.iter().map(move |service| Case::Credentials {
                    service: *service,
                    address: address.to_string(),
                })
            })
            .collect(),
        ScenarioKind::Consistency => CONSISTENCY_ADDRESSES
            .iter()
            .map(|address| Case::Consistency {
                address: address.to_string(),
            })
            .collect(),
        ScenarioKind::Pharmacies => LANDMARKS
            .iter()
            .map(|landmark| Case::Pharmacies {
                landmark: landmark.to_string(),
                place_type: LANDMARK_PLACE_TYPE.to_string(),
            })
            .collect(),
        ScenarioKind::MetroPlaces => PLACE_TYPES
            .iter()
            .flat_map(|place_type| {
                METRO_ADDRESSES.iter().map(move |address| Case::MetroPlaces {
                    address: address.to_string(),
                    place_type: place_type.to_string(),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(all_cases(ScenarioKind::Credentials).len(), 4);
        assert_eq!(all_cases(ScenarioKind::Consistency).len(), 9);
        assert_eq!(all_cases(ScenarioKind::Pharmacies).len(), 6);
        assert_eq!(all_cases(ScenarioKind::MetroPlaces).len(), 40);
    }

    #[test]
    fn test_cases_report_their_kind() {
        for kind in ScenarioKind::ALL {
            assert!(all_cases(kind).iter().all(|c| c.kind() == kind));
        }
    }

    #[test]
    fn test_labels() {
        let case = Case::Pharmacies {
            landmark: "London, Big Ben".into(),
            place_type: "pharmacy".into(),
        };
        assert_eq!(case.to_string(), "pharmacy near London, Big Ben");

        let case = Case::Credentials {
            service: Service::Search,
            address: "x".into(),
        };
        assert_eq!(case.to_string(), "Place-search / x");
    }
}
