use crate::models::Doctor;

/// The clinic's bookable doctors, in the order the widget lists them.
pub fn seed_catalog() -> Vec<Doctor> {
    vec![
        Doctor {
            experience: Some("15+ years".to_string()),
            rating: Some(4.9),
            location: Some("HSR Layout, Bangalore".to_string()),
            availability: Some("Available Today".to_string()),
            qualifications: vec![
                "MBBS".to_string(),
                "MS Ortho".to_string(),
                "Fellowship in Sports Medicine".to_string(),
            ],
            image: Some("/doctors/dr-sameer.jpg".to_string()),
            ..Doctor::new("dr-sameer", "Dr. Sameer", 700, "Orthopedic Surgeon")
        },
        Doctor {
            experience: Some("10+ years".to_string()),
            rating: Some(4.7),
            location: Some("HSR Layout, Bangalore".to_string()),
            availability: Some("Available Today".to_string()),
            qualifications: vec!["MBBS".to_string(), "MS Ortho".to_string()],
            image: Some("/doctors/default-doctor.jpg".to_string()),
            ..Doctor::new("other-doctors", "Other Doctors", 1000, "Sports Orthopedic Doctors")
        },
    ]
}
