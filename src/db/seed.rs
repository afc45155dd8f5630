//! Demo dataset loaded into the in-memory stores at startup, mirroring
//! the salon's production roster shape.

use secrecy::SecretString;
use time::macros::time;
use uuid::Uuid;

use crate::db::models::{Professional, Service};
use crate::scheduling::{DaySchedule, TimeRange, WeeklySchedule};

fn salon_hours() -> DaySchedule {
    DaySchedule {
        start: time!(09:00),
        end: time!(18:00),
        breaks: vec![TimeRange {
            start: time!(12:00),
            end: time!(13:00),
        }],
    }
}

fn weekdays_and_saturday() -> WeeklySchedule {
    let hours = salon_hours();
    WeeklySchedule {
        sunday: None,
        monday: Some(hours.clone()),
        tuesday: Some(hours.clone()),
        wednesday: Some(hours.clone()),
        thursday: Some(hours.clone()),
        friday: Some(hours.clone()),
        saturday: Some(DaySchedule {
            start: time!(09:00),
            end: time!(14:00),
            breaks: vec![],
        }),
    }
}

fn service(name: &str, duration_minutes: u16, price: f64) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        duration_minutes,
        price,
        description: None,
    }
}

pub fn demo_professionals() -> Vec<Professional> {
    vec![
        Professional {
            id: Uuid::new_v4(),
            name: "Ana Souza".into(),
            specialties: vec!["Cortes".into(), "Coloração".into()],
            bio: Some("Cabeleireira há 12 anos".into()),
            working_hours: weekdays_and_saturday(),
            services_offered: vec![
                service("Corte Feminino", 60, 120.0),
                service("Coloração", 120, 280.0),
                service("Escova", 45, 80.0),
            ],
            pin: SecretString::from("4321"),
        },
        Professional {
            id: Uuid::new_v4(),
            name: "Carla Lima".into(),
            specialties: vec!["Manicure".into(), "Pedicure".into()],
            bio: None,
            working_hours: weekdays_and_saturday(),
            services_offered: vec![
                service("Manicure", 45, 60.0),
                service("Pedicure", 60, 75.0),
            ],
            pin: SecretString::from("8765"),
        },
    ]
}
