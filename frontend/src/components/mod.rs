pub mod comments_table;
pub mod home;
pub mod layout;
pub mod results_page;
pub mod video_result;
