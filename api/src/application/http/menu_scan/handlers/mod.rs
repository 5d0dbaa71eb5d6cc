pub mod scan_menu;
