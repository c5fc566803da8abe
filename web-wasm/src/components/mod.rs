pub mod card;
pub mod form_field;
pub mod image_converter;
pub mod stamp_form;
pub mod toast;
