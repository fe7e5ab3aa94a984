pub mod chatbot;
pub mod dashboard;
pub mod home;
pub mod layout;
pub mod notifications;
pub mod registration;
pub mod volunteer_queue;
