pub mod headings;
pub mod html2md;
