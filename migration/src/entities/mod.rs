pub mod click_event;
pub mod link;

pub use click_event::Entity as ClickEventEntity;
pub use link::Entity as LinkEntity;
