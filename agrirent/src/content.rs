// agrirent/src/content.rs

//! Static legal pages shown from Settings.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocument {
  pub title: &'static str,
  pub effective_date: &'static str,
  pub sections: &'static [Section],
}

#[derive(Debug, Serialize)]
pub struct Section {
  pub heading: &'static str,
  pub paragraphs: &'static [&'static str],
}

pub static PRIVACY_POLICY: LegalDocument = LegalDocument {
  title: "Privacy Policy for AgriRent",
  effective_date: "2024",
  sections: &[
    Section {
      heading: "1. Introduction",
      paragraphs: &["This Privacy Policy explains how AgriRent (\"we,\" \"us,\" or \"our\") collects, uses, and discloses information about you when you use our mobile application for agricultural equipment rental."],
    },
    Section {
      heading: "2. Information We Collect",
      paragraphs: &[
        "Personal Information: We may collect personal information such as your name, email address, phone number, and location when you create an account or use our services.",
        "Usage Data: We may collect information about how you access and use the App, including your device information, IP address, and usage patterns.",
      ],
    },
    Section {
      heading: "3. How We Use Your Information",
      paragraphs: &[
        "We may use your information for the following purposes:",
        "To provide and maintain our services.",
        "To communicate with you, including sending notifications and updates.",
        "To process transactions and manage your account.",
        "To improve our App and develop new features.",
        "To analyze usage trends and enhance user experience.",
        "To comply with legal obligations.",
      ],
    },
    Section {
      heading: "4. Sharing Your Information",
      paragraphs: &["We do not sell or rent your personal information to third parties. We may share your information with service providers who assist us in operating the App, with law enforcement or regulatory authorities as required by law, and in connection with a business transfer or merger."],
    },
    Section {
      heading: "5. Data Security",
      paragraphs: &["We take reasonable measures to protect your information from unauthorized access, use, or disclosure. However, no method of transmission over the internet or electronic storage is 100% secure."],
    },
    Section {
      heading: "6. Your Rights",
      paragraphs: &["You have the right to access and update your personal information, request the deletion of your information, and withdraw consent to our processing of your information."],
    },
    Section {
      heading: "7. Changes to This Privacy Policy",
      paragraphs: &["We may update this Privacy Policy from time to time. We will notify you of any changes by posting the new Privacy Policy in the App."],
    },
    Section {
      heading: "8. Contact Us",
      paragraphs: &["If you have any questions or concerns about this Privacy Policy, please contact us at support@yourapp.com."],
    },
  ],
};

pub static TERMS_OF_SERVICE: LegalDocument = LegalDocument {
  title: "Terms of Service for AgriRent",
  effective_date: "2024",
  sections: &[
    Section {
      heading: "1. Acceptance of Terms",
      paragraphs: &["By accessing or using AgriRent, you agree to be bound by these Terms of Service. If you do not agree with any part of these terms, you must not use the App."],
    },
    Section {
      heading: "2. Changes to Terms",
      paragraphs: &["We may modify these Terms of Service at any time. Your continued use of the App after any changes indicates your acceptance of the new Terms."],
    },
    Section {
      heading: "3. User Accounts",
      paragraphs: &["You are responsible for maintaining the confidentiality of your account information and for all activities that occur under your account."],
    },
    Section {
      heading: "4. Rental Transactions",
      paragraphs: &["AgriRent provides a platform for users to rent agricultural equipment. All rental agreements are between the renter and the equipment owner. We are not responsible for any disputes between users."],
    },
    Section {
      heading: "5. Limitation of Liability",
      paragraphs: &["To the fullest extent permitted by law, AgriRent shall not be liable for any indirect, incidental, special, consequential, or punitive damages arising out of or relating to your use of the App."],
    },
    Section {
      heading: "6. Governing Law",
      paragraphs: &["These Terms of Service shall be governed by and construed in accordance with the laws of your jurisdiction, without regard to its conflict of law principles."],
    },
    Section {
      heading: "7. Contact Us",
      paragraphs: &["If you have any questions or concerns about these Terms of Service, please contact us at support@yourapp.com."],
    },
  ],
};
