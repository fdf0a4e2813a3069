pub mod stagger;
