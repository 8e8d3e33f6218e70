mod html;
mod pdf;
mod sniffing;
