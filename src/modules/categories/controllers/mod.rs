pub mod category_controller;
