pub mod form_view_model;
