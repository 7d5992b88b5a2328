pub mod dto;
pub mod services;

pub use dto::{Announcement, ChallengeForm, ChallengeInfo, Upload, UserInfo};
