//! Status enums for every entity kind.
//!
//! Statuses are closed, string-valued enumerations stored as snake_case
//! strings in the hosted database. Each enum's `#[default]` variant is the
//! state a freshly created record lands in when the create form leaves the
//! status untouched.

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Default,
            serde::Serialize,
            serde::Deserialize,
            strum_macros::Display,
            strum_macros::EnumString,
            strum_macros::IntoStaticStr,
        )]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Canonical wire string for this status.
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }
    };
}

define_status_enum! {
    /// Client relationship status.
    ClientStatus {
        #[default]
        Lead,
        Active,
        Inactive,
        Archived,
    }
}

define_status_enum! {
    /// Commercial package lifecycle.
    PackageStatus {
        #[default]
        Draft,
        Published,
        Archived,
    }
}

define_status_enum! {
    /// Prestation (service offering) lifecycle.
    PrestationStatus {
        #[default]
        Draft,
        Published,
        Archived,
    }
}

define_status_enum! {
    /// One-off commercial offer lifecycle.
    OfferStatus {
        #[default]
        Draft,
        Published,
        Expired,
        Archived,
    }
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        #[default]
        Draft,
        Active,
        Paused,
        Completed,
        Archived,
    }
}

define_status_enum! {
    /// Task progress status.
    TaskStatus {
        #[default]
        Todo,
        InProgress,
        Done,
        Cancelled,
    }
}

define_status_enum! {
    /// Specification document (cahier des charges) workflow status.
    SpecificationStatus {
        #[default]
        Draft,
        Review,
        Approved,
        Archived,
    }
}

define_status_enum! {
    /// Marketing campaign lifecycle.
    CampaignStatus {
        #[default]
        Draft,
        Scheduled,
        Running,
        Completed,
        Archived,
    }
}

define_status_enum! {
    /// Content planning pipeline stage.
    ContentPlanStatus {
        #[default]
        Idea,
        Drafting,
        Ready,
        Published,
    }
}

define_status_enum! {
    /// Social publication status.
    SocialPostStatus {
        #[default]
        Draft,
        Scheduled,
        Published,
        Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wire_strings_are_snake_case() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(ClientStatus::Lead.as_str(), "lead");
        assert_eq!(CampaignStatus::Running.as_str(), "running");
    }

    #[test]
    fn parse_round_trips() {
        let s = TaskStatus::from_str("in_progress").unwrap();
        assert_eq!(s, TaskStatus::InProgress);
    }

    #[test]
    fn serde_uses_the_same_strings() {
        let json = serde_json::to_string(&ProjectStatus::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
        let back: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProjectStatus::Paused);
    }

    #[test]
    fn defaults_match_the_create_form() {
        assert_eq!(ClientStatus::default(), ClientStatus::Lead);
        assert_eq!(PackageStatus::default(), PackageStatus::Draft);
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(ContentPlanStatus::default(), ContentPlanStatus::Idea);
    }
}
