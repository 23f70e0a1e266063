pub mod my_reviews;
pub mod product_grid;
pub mod review_form;
pub mod reviews_list;
pub mod wallet_bar;
