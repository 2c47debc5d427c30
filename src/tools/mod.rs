pub mod policytool;
