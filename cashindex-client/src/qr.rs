//! QR code generation for payment prompts.
//!
//! The payment panel shows the quoted cashaddr and a QR code for it. Wallets
//! scan either the bare address or a BIP21-style URI carrying the amount.

use crate::types::{Network, PaymentQuote};

/// Build a payment URI for a quote
/// (`bitcoincash:qq...?amount=0.00100000`).
///
/// Quoted addresses usually arrive with their cashaddr prefix already in
/// place; when one doesn't, the network's prefix is prepended.
pub fn payment_uri(quote: &PaymentQuote, network: Network) -> String {
    let address = if quote.payment_address.contains(':') {
        quote.payment_address.clone()
    } else {
        format!("{}{}", network.address_prefix(), quote.payment_address)
    };
    format!("{}?amount={:.8}", address, quote.amount_to_pay)
}

#[cfg(feature = "qrcode")]
mod qr_impl {
    use qrcode::QrCode;
    use image::Luma;

    use crate::error::{ClientError, ClientResult};

    /// QR code output format
    #[derive(Debug, Clone, Copy)]
    pub enum QrFormat {
        /// PNG image bytes
        Png,
        /// SVG string
        Svg,
        /// Unicode art for terminal display
        Terminal,
    }

    /// Options for QR code generation
    #[derive(Debug, Clone)]
    pub struct QrOptions {
        /// Image size in pixels (for PNG)
        pub size: u32,
        /// Quiet zone (margin) in modules
        pub quiet_zone: u32,
        /// Output format
        pub format: QrFormat,
    }

    impl Default for QrOptions {
        fn default() -> Self {
            Self {
                size: 256,
                quiet_zone: 2,
                format: QrFormat::Png,
            }
        }
    }

    impl QrOptions {
        /// Create options for PNG output
        pub fn png(size: u32) -> Self {
            Self {
                size,
                format: QrFormat::Png,
                ..Self::default()
            }
        }

        /// Create options for SVG output
        pub fn svg() -> Self {
            Self {
                format: QrFormat::Svg,
                ..Self::default()
            }
        }

        /// Create options for terminal output
        pub fn terminal() -> Self {
            Self {
                format: QrFormat::Terminal,
                ..Self::default()
            }
        }
    }

    /// Generate a QR code from payment data (an address or payment URI).
    pub fn generate_qr(data: &str, options: &QrOptions) -> ClientResult<Vec<u8>> {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| ClientError::Qr(e.to_string()))?;

        match options.format {
            QrFormat::Png => generate_png(&code, options),
            QrFormat::Svg => Ok(generate_svg(&code, options).into_bytes()),
            QrFormat::Terminal => Ok(generate_terminal(&code).into_bytes()),
        }
    }

    fn generate_png(code: &QrCode, options: &QrOptions) -> ClientResult<Vec<u8>> {
        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(options.quiet_zone > 0)
            .min_dimensions(options.size, options.size)
            .build();

        let mut bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);

        image::ImageEncoder::write_image(
            encoder,
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| ClientError::Qr(e.to_string()))?;

        Ok(bytes)
    }

    fn generate_svg(code: &QrCode, options: &QrOptions) -> String {
        code.render()
            .quiet_zone(options.quiet_zone > 0)
            .dark_color(qrcode::render::svg::Color("#000000"))
            .light_color(qrcode::render::svg::Color("#ffffff"))
            .build()
    }

    fn generate_terminal(code: &QrCode) -> String {
        code.render::<char>()
            .quiet_zone(true)
            .module_dimensions(2, 1)
            .build()
    }

    /// Generate a QR code as a data URI for embedding in HTML.
    pub fn generate_data_uri(data: &str) -> ClientResult<String> {
        let png_bytes = generate_qr(data, &QrOptions::png(256))?;

        use base64::{engine::general_purpose::STANDARD, Engine};
        let b64 = STANDARD.encode(&png_bytes);

        Ok(format!("data:image/png;base64,{}", b64))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_qr_generation() {
            // PNG
            let png = generate_qr("bchtest:xyz", &QrOptions::png(128)).unwrap();
            assert!(!png.is_empty());
            assert!(png.starts_with(&[0x89, 0x50, 0x4E, 0x47])); // PNG magic bytes

            // SVG
            let svg = generate_qr("bchtest:xyz", &QrOptions::svg()).unwrap();
            let svg_str = String::from_utf8(svg).unwrap();
            assert!(svg_str.contains("<svg"));

            // Terminal
            let term = generate_qr("bchtest:xyz", &QrOptions::terminal()).unwrap();
            assert!(!term.is_empty());
        }

        #[test]
        fn test_data_uri() {
            let uri = generate_data_uri("bchtest:xyz").unwrap();
            assert!(uri.starts_with("data:image/png;base64,"));
        }
    }
}

#[cfg(feature = "qrcode")]
pub use qr_impl::*;
