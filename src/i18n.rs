//! User-facing message catalogue

/// Message keys surfaced to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    NameRequired,
    QuotaRequired,
    QuotaMustBePositive,
    CountRequired,
    CountMustBePositive,
    SubscriptionPlan,
    RequestFailed,
    RedemptionUpdated,
    RedemptionCreated,
    DownloadTitle,
    DownloadPrompt,
    DownloadHint,
    EquivalentAmount,
}

/// Resolves message keys to display text
pub trait Localizer: Send + Sync {
    fn text(&self, message: Message) -> String;
}

/// Built-in catalogues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Catalog {
    #[default]
    English,
    Chinese,
}

impl Catalog {
    /// Picks a catalogue from a locale tag; unknown tags fall back to English
    pub fn from_locale(locale: &str) -> Self {
        match locale.to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" | "zh-hans" => Catalog::Chinese,
            _ => Catalog::English,
        }
    }

    fn english(message: Message) -> &'static str {
        match message {
            Message::NameRequired => "Please enter a name",
            Message::QuotaRequired => "Please enter a quota",
            Message::QuotaMustBePositive => "Quota must be greater than 0",
            Message::CountRequired => "Please enter the number of codes",
            Message::CountMustBePositive => "Number of codes must be greater than 0",
            Message::SubscriptionPlan => "Subscription plan",
            Message::RequestFailed => "Request failed",
            Message::RedemptionUpdated => "Redemption code updated!",
            Message::RedemptionCreated => "Redemption code created!",
            Message::DownloadTitle => "Redemption codes created",
            Message::DownloadPrompt => "Redemption codes created. Download them?",
            Message::DownloadHint => {
                "The codes will be saved as a text file named after the redemption."
            }
            Message::EquivalentAmount => "Equivalent amount: ",
        }
    }

    fn chinese(message: Message) -> &'static str {
        match message {
            Message::NameRequired => "请输入名称",
            Message::QuotaRequired => "请输入额度",
            Message::QuotaMustBePositive => "额度必须大于0",
            Message::CountRequired => "请输入生成数量",
            Message::CountMustBePositive => "生成数量必须大于0",
            Message::SubscriptionPlan => "订阅套餐",
            Message::RequestFailed => "请求失败",
            Message::RedemptionUpdated => "兑换码更新成功！",
            Message::RedemptionCreated => "兑换码创建成功！",
            Message::DownloadTitle => "兑换码创建成功",
            Message::DownloadPrompt => "兑换码创建成功，是否下载兑换码？",
            Message::DownloadHint => "兑换码将以文本文件的形式下载，文件名为兑换码的名称。",
            Message::EquivalentAmount => "等价金额：",
        }
    }
}

impl Localizer for Catalog {
    fn text(&self, message: Message) -> String {
        match self {
            Catalog::English => Self::english(message),
            Catalog::Chinese => Self::chinese(message),
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locale() {
        assert_eq!(Catalog::from_locale("zh-CN"), Catalog::Chinese);
        assert_eq!(Catalog::from_locale("en"), Catalog::English);
        assert_eq!(Catalog::from_locale("fr"), Catalog::English);
    }

    #[test]
    fn test_text() {
        assert_eq!(Catalog::English.text(Message::SubscriptionPlan), "Subscription plan");
        assert_eq!(Catalog::Chinese.text(Message::SubscriptionPlan), "订阅套餐");
    }
}
